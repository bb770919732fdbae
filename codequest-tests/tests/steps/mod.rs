mod common_steps;
mod completion_steps;
mod drag_classify_steps;
mod pairs_memory_steps;
mod reward_steps;
mod sequence_recall_steps;
mod timed_match_steps;
