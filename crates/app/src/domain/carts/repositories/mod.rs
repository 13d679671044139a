//! Carts persistence, split between the cart row and its lines.

mod carts;
mod lines;

pub(crate) use carts::PgCartsRepository;
pub(crate) use lines::{CartLineInsert, PgCartLinesRepository};
