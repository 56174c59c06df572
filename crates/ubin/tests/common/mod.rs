// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Game-state model shared by the integration tests.

#![allow(dead_code)]

use ubin::{Binary, Reader, Result, ValueConverter, Writer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Binary)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Binary)]
#[repr(u8)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator = 9,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Binary)]
pub struct Texture {
    pub path: String,
}

/// Four-character code stored as 4 raw bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Binary)]
#[bin(converter = FourCcConverter)]
pub struct FourCc(pub [u8; 4]);

#[derive(Debug, Default, Clone, Copy)]
pub struct FourCcConverter;

impl ValueConverter<FourCc> for FourCcConverter {
    fn write(&self, value: &FourCc, w: &mut Writer<'_>) -> Result<()> {
        w.write_bytes(&value.0);
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<FourCc> {
        let bytes = r.read_bytes(4)?;
        Ok(FourCc([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Binary)]
pub struct Item {
    #[bin(index = 0)]
    pub id: FourCc,
    #[bin(index = 1)]
    pub amount: u8,
}

#[derive(Debug, Default, Clone, PartialEq, Binary)]
pub struct Player {
    #[bin(index = 0)]
    pub health: i32,
    #[bin(index = 1, generation = 2)]
    pub hunger: i32,
    #[bin(index = 2)]
    pub position: Vector3,
    #[bin(index = 3)]
    pub mode: GameMode,
    #[bin(index = 4)]
    pub skin: Option<Texture>,
    #[bin(index = 5)]
    pub items: Option<Vec<Item>>,
}

pub fn sample_player() -> Player {
    Player {
        health: 23,
        hunger: 234,
        position: Vector3 {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        },
        mode: GameMode::Creative,
        skin: Some(Texture {
            path: "steve.png".to_string(),
        }),
        items: Some(vec![Item {
            id: FourCc(*b"GOLD"),
            amount: 3,
        }]),
    }
}
