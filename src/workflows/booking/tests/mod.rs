mod common;
mod transitions;
