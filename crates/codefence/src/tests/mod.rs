mod parse_blocks;
mod strip;
