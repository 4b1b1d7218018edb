//! Step definitions for task stage placement scenarios.
