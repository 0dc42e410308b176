//! Unit tests for leveling domain and service behaviour.
