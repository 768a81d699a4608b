// Report → skills → videos.
// All LLM calls go through llm_client and all video lookups through youtube_client.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod skill_extractor;
pub mod video_search;
