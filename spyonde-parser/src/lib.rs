//! # spyonde
//!
//! Converts plain Python scripts, split into cells with `#%%` comment markers, into
//! Jupyter notebooks.
//!
//! File Layout
//!
//! The conversion is a strictly forward pipeline. Each stage lives in its own module
//! and only depends on the ones before it:
//!
//! src/spyonde
//!   ├── lexing        Python-aware tokenizer (strings, comments, encoding cookies)
//!   ├── markers       Separator, bare separator and ignore-marker predicates
//!   ├── cells         Segmenting, classifying, transforming and filtering cells
//!   ├── notebook      The nbformat 4 document model and its JSON form
//!   ├── transforms    Runnable stages composed into the conversion pipeline
//!   └── loader        Reading scripts and writing notebooks
//!
//! For a one-call conversion see [`convert_file`](spyonde::loader::convert_file).

pub mod spyonde;
