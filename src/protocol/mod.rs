//! Protocol layer: bytes ⇄ domain types. Structural checks only; semantic
//! validation is delegated to the domain constructors.
pub mod descriptor;
