//! Binary for generating contract schemas from odra modules.
#![doc = "Binary for generating contract schemas from odra modules."]

#[allow(unused_imports)]
use creditline_contracts;

fn main() {
    // Schema generation is handled by the odra-build crate
}
