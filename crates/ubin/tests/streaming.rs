// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sink/source APIs and shared codec instances.

mod common;

use std::io::{Cursor, Write};
use std::sync::Arc;
use std::thread;

use common::{sample_player, Player};
use ubin::{DataError, Error, SafeCodec, UnsafeCodec};

#[test]
fn payloads_can_be_read_back_to_back() {
    let codec = SafeCodec::<Player>::new().expect("player codec");
    let first = sample_player();
    let second = Player {
        health: 1,
        skin: None,
        ..sample_player()
    };

    let mut log = Vec::new();
    let a = codec.serialize_into(&mut log, &first).expect("first");
    let b = codec.serialize_into(&mut log, &second).expect("second");
    assert_eq!(log.len(), a + b);

    let mut source = Cursor::new(log);
    assert_eq!(codec.deserialize_from(&mut source).expect("first"), first);
    assert_eq!(codec.deserialize_from(&mut source).expect("second"), second);
    assert!(matches!(
        codec.deserialize_from(&mut source),
        Err(Error::Data(DataError::UnexpectedEof { offset: 0, .. }))
    ));
}

#[test]
fn trailing_bytes_are_ignored() {
    let codec = UnsafeCodec::<Player>::new().expect("player codec");
    let mut bytes = codec.serialize(&sample_player()).expect("serialize");
    bytes.extend_from_slice(&[0xAA; 8]);
    assert_eq!(codec.deserialize(&bytes).expect("deserialize"), sample_player());
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failures_are_io_errors() {
    let codec = SafeCodec::<Player>::new().expect("player codec");
    assert!(matches!(
        codec.serialize_into(&mut FailingSink, &sample_player()),
        Err(Error::Io(ref e)) if e.kind() == std::io::ErrorKind::BrokenPipe
    ));
}

#[test]
fn one_codec_serves_many_threads() {
    let codec = Arc::new(SafeCodec::<Player>::new().expect("player codec"));
    let expected = codec.serialize(&sample_player()).expect("reference bytes");

    thread::scope(|s| {
        for worker in 0..8 {
            let codec = Arc::clone(&codec);
            let expected = &expected;
            s.spawn(move || {
                for round in 0..200 {
                    let player = Player {
                        health: worker * 1000 + round,
                        ..sample_player()
                    };
                    let bytes = codec.serialize(&player).expect("serialize");
                    assert_eq!(bytes.len(), expected.len());
                    assert_eq!(codec.deserialize(&bytes).expect("deserialize"), player);
                }
            });
        }
    });
}
