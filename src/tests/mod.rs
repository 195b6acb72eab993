//! Scenario tests for the Merkle Sum Tree

mod vectors;
