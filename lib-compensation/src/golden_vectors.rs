//! Golden Vector Tests for the Compensation Engine
//!
//! These tests pin EXACT outputs for specific snapshots under the canonical
//! rule table (classic-20, four-tier, 0.7% ROI, 4x cap).
//!
//! # Updating Golden Vectors
//!
//! If a rule changes:
//! 1. Update the preset or computation code
//! 2. Update these vectors with the new expected values
//! 3. Call out the changed payout in the commit message
