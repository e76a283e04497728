mod common;
mod constraints;
