pub mod websearch;
