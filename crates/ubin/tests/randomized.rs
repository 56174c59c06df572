// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Seeded random values and corrupted payloads.

mod common;

use common::{FourCc, GameMode, Item, Player, Texture, Vector3};
use ubin::{SafeCodec, UnsafeCodec};

const MODES: [GameMode; 4] = [
    GameMode::Survival,
    GameMode::Creative,
    GameMode::Adventure,
    GameMode::Spectator,
];

fn random_text(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(0..24);
    (0..len).map(|_| rng.alphanumeric()).collect()
}

fn random_player(rng: &mut fastrand::Rng) -> Player {
    Player {
        health: rng.i32(..),
        hunger: rng.i32(..),
        position: Vector3 {
            x: rng.f32() * 1000.0,
            y: rng.f32() * -1000.0,
            z: rng.f32(),
        },
        mode: MODES[rng.usize(..MODES.len())],
        skin: rng.bool().then(|| Texture {
            path: random_text(rng),
        }),
        items: rng.bool().then(|| {
            (0..rng.usize(0..6))
                .map(|_| Item {
                    id: FourCc([rng.u8(..), rng.u8(..), rng.u8(..), rng.u8(..)]),
                    amount: rng.u8(..),
                })
                .collect()
        }),
    }
}

#[test]
fn random_players_round_trip_in_safe_mode() {
    let codec = SafeCodec::<Player>::new().expect("player codec");
    let mut rng = fastrand::Rng::with_seed(0x5EED_0001);
    for _ in 0..500 {
        let player = random_player(&mut rng);
        let bytes = codec.serialize(&player).expect("serialize");
        assert_eq!(codec.deserialize(&bytes).expect("deserialize"), player);
    }
}

#[test]
fn random_players_round_trip_in_unsafe_mode() {
    let codec = UnsafeCodec::<Player>::new().expect("player codec");
    let mut rng = fastrand::Rng::with_seed(0x5EED_0002);
    for _ in 0..500 {
        let mut player = random_player(&mut rng);
        // fixed layouts cannot carry absent values
        player.skin.get_or_insert_with(Texture::default);
        player.items.get_or_insert_with(Vec::new);
        let bytes = codec.serialize(&player).expect("serialize");
        assert_eq!(codec.deserialize(&bytes).expect("deserialize"), player);
    }
}

#[test]
fn corrupted_payloads_never_panic() {
    let codec = SafeCodec::<Player>::new().expect("player codec");
    let mut rng = fastrand::Rng::with_seed(0x5EED_0003);
    for _ in 0..2000 {
        let mut bytes = codec
            .serialize(&random_player(&mut rng))
            .expect("serialize");
        let flips = rng.usize(1..4);
        for _ in 0..flips {
            let at = rng.usize(..bytes.len());
            bytes[at] = rng.u8(..);
        }
        bytes.truncate(rng.usize(..=bytes.len()));
        let _ = codec.deserialize(&bytes);
    }
}
