use crate::math::Point2d;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

#[allow(unused)]
pub fn debug_line(name: &str, p1: Point2d, p2: Point2d) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "line",
            "name": name,
            "p1": [p1.x, p1.y],
            "p2": [p2.x, p2.y],
        }))
    })
}

#[allow(unused)]
pub fn debug_rect(name: &str, corners: &[Point2d]) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "rect",
            "name": name,
            "corners": corners.iter().map(|c| [c.x, c.y]).collect::<Vec<_>>(),
        }))
    })
}

#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}

#[cfg(all(test, feature = "debug"))]
mod test {
    use super::*;
    use crate::{CarState, Lidar, OrientedRect};

    #[test]
    fn scan_fills_a_frame_and_taking_it_drains_it() {
        let wall = OrientedRect::new(5.0, 0.0, 0.0, 2.0, 4.0).unwrap();
        let lidar = Lidar::new(4, 10.0, false).unwrap();
        lidar.scan(&CarState::new(0.0, 0.0, 0.0, 0.0), &[wall.clone()]);
        debug_rect("slot", wall.corners());

        let frame = take_debug_frame();
        let entries = frame.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert!(entries[..4].iter().all(|e| e["type"] == "line"));
        assert_eq!(entries[4]["type"], "rect");
        assert_eq!(entries[4]["corners"].as_array().unwrap().len(), 4);

        assert!(take_debug_frame().as_array().unwrap().is_empty());
    }
}
