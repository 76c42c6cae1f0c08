//! Core types for Redcart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod cart;
pub mod email;
pub mod id;
pub mod money;
pub mod product;
pub mod settings;
pub mod shipping;

pub use account::{AccountError, LOGIN_REDIRECT, LoginForm, SIGNUP_REDIRECT, SignupForm};
pub use cart::CartLineItem;
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{format_usd, round_cents};
pub use product::{Comment, CommentUser, Product, StarRating};
pub use settings::{Setting, Settings};
pub use shipping::{CheckoutSummary, ShippingMethod};
