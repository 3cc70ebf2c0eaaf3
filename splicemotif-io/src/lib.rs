#![doc = include_str!("../README.md")]

extern crate splicemotif;

pub mod dump;
pub mod error;
pub mod jaspar;
pub mod kmer;
