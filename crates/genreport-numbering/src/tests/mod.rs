mod common;
mod connectivity;
mod engine_run;
mod numbering;
