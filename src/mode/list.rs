//! Provider and palette listing

use crate::output::print_listing;
use crate::palette::PALETTES;
use crate::provider::get_providers;

pub fn run_list() {
    print_listing(&get_providers(), &PALETTES);
}
