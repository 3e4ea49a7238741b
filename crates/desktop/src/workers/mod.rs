pub mod transcribe_worker;
