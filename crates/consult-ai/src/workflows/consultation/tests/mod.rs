mod common;
mod diagnosis;
