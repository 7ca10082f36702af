// AI-assisted editing.
// Step editors reach the regenerate endpoint only through client::TextGenerator;
// responses are segmented into rows and applied under the wizard lock.

pub mod client;
pub mod editors;
pub mod handlers;
pub mod inflight;
pub mod keywords;
pub mod segment;

#[cfg(test)]
pub mod testing;
