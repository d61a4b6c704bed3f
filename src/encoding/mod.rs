pub mod bitpacked;
pub mod delta_bitpacked;
pub mod uleb128;
pub mod zigzag_leb128;
