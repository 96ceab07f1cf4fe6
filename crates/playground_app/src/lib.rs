//! Headless SVG optimization playground: an element tree driven from the console.
pub mod platform;
