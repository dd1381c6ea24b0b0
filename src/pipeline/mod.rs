// Pipelines that run the scorer over more than one transcript.

pub mod batch;
