// Career tools beside the resume wizard: cover letters and mock interviews.

pub mod cover_letter;
pub mod handlers;
pub mod interview;
pub mod prefill;
