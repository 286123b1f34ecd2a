#![allow(clippy::needless_return)]

pub mod common;

pub mod operators;

pub mod dataset;

pub mod tree;

pub mod problem;

pub mod topology;

pub mod cellular;
