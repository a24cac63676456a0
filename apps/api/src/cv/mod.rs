// CV parsing pipeline: profile extraction and feedback scoring with
// rule-based fallbacks. All generator calls go through cv::attempt.

pub mod attempt;
pub mod cancel;
pub mod feedback;
pub mod handlers;
pub mod pipeline;
pub mod profile_extractor;
pub mod prompts;
