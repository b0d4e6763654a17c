#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Asset token (CEP-18)
pub mod token;
pub mod errors;
pub mod events;

// Credit line protocol
pub mod lending;
