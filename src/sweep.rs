use crate::key::TrackKey;
use crate::store::TrackStore;

/// Drops every track unseen for more than `ttl_frames` ticks and returns the evicted keys.
///
/// A track exactly `ttl_frames` behind survives. Colors are left to the palette.
pub fn sweep(store: &mut TrackStore, ttl_frames: u64) -> Vec<TrackKey> {
    let now = store.tick();
    let mut evicted = Vec::new();

    store.tracks.retain(|key, track| {
        let keep = now.saturating_sub(track.last_seen_tick) <= ttl_frames;
        if !keep {
            evicted.push(key.clone());
        }

        keep
    });

    if !evicted.is_empty() {
        tracing::debug!(tick = now, count = evicted.len(), "evicted stale tracks");
    }

    evicted
}
