mod graph;
mod spec;
