//! Trade execution logic
//!
//! Walks the opposing side from its best price outward, trading the
//! incoming order against level heads while prices still cross.

use lob_types::numeric::Price;
use lob_types::order::{Order, Side};
use tracing::trace;

use crate::book::{BookSide, PriceLevel};
use crate::events::Fill;
use crate::registry::OrderRegistry;
use crate::volume::VolumeTable;

use super::crossing;

/// Match executor for sweeping resting liquidity
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Sequence the next fill will carry
    pub fn sequence(&self) -> u64 {
        self.sequence_counter
    }

    /// Get next sequence number (monotonically increasing)
    #[inline(always)]
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Match `taker` against `makers` until it is filled or stops crossing
    ///
    /// Returns the number of fills. Filled makers are retired from the
    /// registry and popped; drained levels leave the best-price index.
    #[inline]
    pub(crate) fn sweep<F: FnMut(&Fill)>(
        &mut self,
        taker: &mut Order,
        makers: &mut BookSide,
        registry: &mut OrderRegistry,
        volume: &mut VolumeTable,
        on_fill: &mut F,
    ) -> u32 {
        let maker_side = makers.side();
        let mut matches = 0;

        while taker.quantity > 0 {
            let Some(slot) = makers.best_slot() else {
                break;
            };
            let price = makers.price_at(slot);
            if !crossing::incoming_can_match(taker.side, taker.price, price) {
                break;
            }

            let level = makers.level_mut(slot);
            matches += self.fill_level(taker, level, slot, price, maker_side, registry, volume, on_fill);
            makers.release_if_empty(slot);
        }

        matches
    }

    /// Trade against the head of one level until either side is exhausted
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn fill_level<F: FnMut(&Fill)>(
        &mut self,
        taker: &mut Order,
        level: &mut PriceLevel,
        slot: usize,
        price: Price,
        maker_side: Side,
        registry: &mut OrderRegistry,
        volume: &mut VolumeTable,
        on_fill: &mut F,
    ) -> u32 {
        let mut fills = 0;

        while taker.quantity > 0 {
            let Some(maker_id) = level.front() else {
                break;
            };
            let Some(maker) = registry.get_mut(maker_id) else {
                // Stale id; cannot happen while queue membership tracks liveness.
                debug_assert!(false, "dead order {maker_id} queued at {price}");
                level.pop();
                continue;
            };

            let quantity = taker.quantity.min(maker.quantity);
            taker.quantity -= quantity;
            maker.quantity -= quantity;
            let maker_remaining = maker.quantity;
            volume.sub(maker_side, slot, quantity);
            fills += 1;

            let fill = Fill {
                sequence: self.next_sequence(),
                maker_order_id: maker_id,
                taker_order_id: taker.id,
                side: taker.side,
                price,
                quantity,
                maker_remaining,
            };
            trace!(
                sequence = fill.sequence,
                maker = %maker_id,
                taker = %taker.id,
                price,
                quantity,
                "fill"
            );
            on_fill(&fill);

            if maker_remaining == 0 {
                registry.retire(maker_id);
                level.pop();
            }
        }

        fills
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::new(0)
    }
}
