use std::fmt;

use anyhow::Result;

use crate::config::{DEFAULT_COLOR, DEFAULT_POSITION};
use crate::term::Canvas;
use crate::{Position, Rgb};

/// A square area of the board in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

/// Data every object on the board carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameObject {
    pub position: Position,
    pub body_color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    DrawNotImplemented(&'static str),
}

/// Something that lives on the board and knows how to paint itself.
pub trait Entity {
    fn object(&self) -> &GameObject;

    /// Concrete entities must provide their own drawing. Reaching this
    /// default is a bug in the entity, so it is reported as an error that
    /// stops the game loop.
    fn draw(&self, _canvas: &mut dyn Canvas) -> Result<()> {
        Err(EntityError::DrawNotImplemented(std::any::type_name::<Self>()).into())
    }
}

impl GameObject {
    pub fn new(position: Position, body_color: Rgb) -> Self {
        GameObject { position, body_color }
    }
}

impl Default for GameObject {
    fn default() -> Self {
        GameObject::new(DEFAULT_POSITION, DEFAULT_COLOR)
    }
}

impl Entity for GameObject {
    fn object(&self) -> &GameObject {
        self
    }
}

pub fn cell_rect(position: Position, size: i32) -> Rect {
    Rect { x: position.0, y: position.1, size }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::DrawNotImplemented(name) => write!(f, "define draw for {}", name),
        }
    }
}

impl std::error::Error for EntityError {}
