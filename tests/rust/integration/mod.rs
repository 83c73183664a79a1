//! Integration tests - engine operations driven end to end through a
//! scripted query executor over the Haddock demo schema
//! (regions / customers / products / sales).

mod fixtures;
