#[macro_use] extern crate log;
extern crate lazy_static;
extern crate regex;

pub mod frontend;
