pub mod piece_builder;
