use playground_core::{BlobCache, BlobChange, PanelState, Panels, Region, Slot};

#[test]
fn split_iff_input_and_output_open() {
    for (input_open, output_open) in [(false, false), (false, true), (true, false), (true, true)] {
        let mut panels = Panels::new();
        panels.set_open(Region::Input, input_open);
        panels.set_open(Region::Output, output_open);

        let expected = input_open && output_open;
        assert_eq!(panels.is_split(), expected, "input={input_open} output={output_open}");
        let half = |region| panels.state(region) == PanelState::OpenSplit;
        assert_eq!(half(Region::Input), expected);
        assert_eq!(half(Region::Output), expected);
    }
}

#[test]
fn open_is_idempotent() {
    let mut panels = Panels::new();
    panels.open(Region::Output);
    let once = panels.clone();
    panels.open(Region::Output);
    assert_eq!(panels, once);
    assert_eq!(panels.state(Region::Output), PanelState::OpenSplit);
}

#[test]
fn sections_never_split() {
    let mut panels = Panels::new();
    panels.open(Region::Output);
    panels.open(Region::Info);
    assert_eq!(panels.state(Region::Info), PanelState::Open);
}

#[test]
fn cached_handle_is_stable_until_invalidated() {
    let mut cache = BlobCache::new();

    let (first, change) = cache.get_or_create(Slot::Input, "<svg/>");
    assert!(matches!(change, Some(BlobChange::Published { .. })));

    let (again, change) = cache.get_or_create(Slot::Input, "ignored");
    assert_eq!(again, first);
    assert_eq!(change, None);

    assert_eq!(
        cache.invalidate(Slot::Input),
        Some(BlobChange::Revoked { url: first.clone() })
    );
    let (fresh, change) = cache.get_or_create(Slot::Input, "<svg></svg>");
    assert_ne!(fresh, first);
    assert_eq!(
        change,
        Some(BlobChange::Published {
            url: fresh,
            text: "<svg></svg>".to_string()
        })
    );
}

#[test]
fn slots_are_independent() {
    let mut cache = BlobCache::new();
    let (input, _) = cache.get_or_create(Slot::Input, "a");
    let (output, _) = cache.get_or_create(Slot::Output, "b");
    assert_ne!(input, output);

    cache.invalidate(Slot::Output);
    assert_eq!(cache.get(Slot::Input), Some(&input));
    assert_eq!(cache.get(Slot::Output), None);
}

#[test]
fn drain_releases_everything_once() {
    let mut cache = BlobCache::new();
    let (input, _) = cache.get_or_create(Slot::Input, "a");
    let (output, _) = cache.get_or_create(Slot::Output, "b");

    let released = cache.drain();
    assert_eq!(
        released,
        vec![
            BlobChange::Revoked { url: input },
            BlobChange::Revoked { url: output }
        ]
    );
    assert!(cache.drain().is_empty());
}
