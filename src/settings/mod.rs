mod heuristics;

pub use heuristics::HeuristicSettings;
