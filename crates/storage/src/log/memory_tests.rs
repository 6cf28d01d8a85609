// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn append_and_read_back() {
    let log = MemoryLog::new();

    assert_eq!(log.append(vec![Entry::new("a", "1")]).unwrap(), 0);
    assert_eq!(
        log.append(vec![Entry::new("b", "2"), Entry::new("c", "3")])
            .unwrap(),
        2
    );

    let records = log.read(0, usize::MAX).unwrap();
    let offsets: Vec<_> = records.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![0, 1, 2]);
}

#[test]
fn truncate_before_makes_old_offsets_out_of_range() {
    let log = MemoryLog::new();
    for _ in 0..5 {
        log.append(vec![Entry::new("", "x")]).unwrap();
    }

    log.truncate_before(3);

    assert_eq!(log.first_offset(), 3);
    assert!(matches!(
        log.read(1, usize::MAX),
        Err(LogError::OffsetOutOfRange { first: 3, .. })
    ));
    assert_eq!(log.read(3, usize::MAX).unwrap().len(), 2);
}

#[test]
fn truncate_never_passes_next_offset() {
    let log = MemoryLog::new();
    log.append(vec![Entry::new("", "x")]).unwrap();

    log.truncate_before(100);

    assert_eq!(log.first_offset(), 1);
    assert!(log.read(1, usize::MAX).unwrap().is_empty());
}

#[test]
fn injected_failure_hits_one_append() {
    let log = MemoryLog::new();
    log.fail_next_append();

    assert!(matches!(
        log.append(vec![Entry::new("", "x")]),
        Err(LogError::Io(_))
    ));
    assert_eq!(log.append(vec![Entry::new("", "x")]).unwrap(), 0);
}
