//! Core types shared by the loader and its callers: math re-exports and
//! the lighting-model material.

pub use glam::{Vec2, Vec3, Vec4, vec3, vec4};

pub mod light;
