#![allow(clippy::doc_markdown)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod analyzer;
pub mod chasen;
pub mod compound;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod item;
pub mod tagger;
pub mod version;
