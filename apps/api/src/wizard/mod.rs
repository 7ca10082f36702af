// The eight-step resume wizard: step order, validators, slice editors,
// the controller that owns the draft, and the review summary.

pub mod controller;
pub mod editors;
pub mod handlers;
pub mod review;
pub mod step;
pub mod validators;
