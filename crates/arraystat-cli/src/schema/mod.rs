pub mod sample_set;
