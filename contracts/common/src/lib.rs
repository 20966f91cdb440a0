#![no_std]

pub mod store;
pub mod text;

pub use store::{has_key, load_collection, load_record, remove_key, save_collection, save_record};
pub use text::{
    contains_ignore_case, format_id, format_numbered, is_blank, read_bytes, str_contains_ignore_case,
};
