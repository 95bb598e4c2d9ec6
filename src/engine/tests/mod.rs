mod common;
mod persona;
mod risk;
