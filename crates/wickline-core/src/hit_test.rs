// File: crates/wickline-core/src/hit_test.rs
// Summary: Resolve a pointer position to the candle body under it.
//
// Boundary convention: a pixel exactly at `x ± half_body` belongs to the gap,
// never to the candle. Pointer Y is not considered; bodies own their whole column.

use crate::mapper::CoordinateMapper;
use crate::types::PointerState;

/// Index of the selected candle, or `None`.
pub type Selection = Option<usize>;

/// Scan candles left to right; the first body containing `pointer.x` wins and a
/// pointer in the gap after a body ends the scan with no selection.
pub fn hit_test(pointer: PointerState, mapper: &CoordinateMapper) -> Selection {
    let (px, _) = pointer.position()?;
    let hw = mapper.half_body_width();
    let n = mapper.len();

    for i in 0..n {
        let x = mapper.index_to_x(i);
        if px > x - hw && px < x + hw {
            return Some(i);
        }
        if i + 1 < n {
            let next_x = mapper.index_to_x(i + 1);
            if px > x + hw && px < next_x - hw {
                return None;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Candle, CandleSeries};
    use crate::types::Viewport;

    fn mapper() -> CoordinateMapper {
        let s = CandleSeries::new(vec![
            Candle::new(1.0, 2.0, 0.0, 1.0),
            Candle::new(1.0, 3.0, 0.0, 2.0),
            Candle::new(2.0, 2.0, 1.0, 1.0),
        ]);
        CoordinateMapper::with_defaults(&s, Viewport::new(300.0, 100.0))
    }

    #[test]
    fn outside_pointer_selects_nothing() {
        assert_eq!(hit_test(PointerState::Outside, &mapper()), None);
    }

    #[test]
    fn body_centres_select_their_candle() {
        let m = mapper();
        for i in 0..3 {
            assert_eq!(hit_test(PointerState::at(m.index_to_x(i), 5.0), &m), Some(i));
        }
    }

    #[test]
    fn gaps_and_margins_select_nothing() {
        let m = mapper();
        // slots are 100px wide with 80px bodies: [10, 90], [110, 190], [210, 290]
        for x in [0.0, 5.0, 100.0, 195.0, 295.0, 300.0, 1000.0, -3.0] {
            assert_eq!(hit_test(PointerState::at(x, 50.0), &m), None, "x = {x}");
        }
    }

    #[test]
    fn body_edges_belong_to_the_gap() {
        let m = mapper();
        assert_eq!(hit_test(PointerState::at(10.0, 0.0), &m), None);
        assert_eq!(hit_test(PointerState::at(90.0, 0.0), &m), None);
        assert_eq!(hit_test(PointerState::at(10.5, 0.0), &m), Some(0));
        assert_eq!(hit_test(PointerState::at(89.5, 0.0), &m), Some(0));
    }

    #[test]
    fn empty_series_selects_nothing() {
        let m = CoordinateMapper::with_defaults(&CandleSeries::empty(), Viewport::new(300.0, 100.0));
        assert_eq!(hit_test(PointerState::at(150.0, 50.0), &m), None);
    }
}
