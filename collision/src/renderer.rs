//! Scene assembly for the collision simulation

use common::DrawList;
use glam::Vec2;

use crate::physics::Simulation;

const CONTAINER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const GUIDE_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Build the frame's draw list: container outline, discs, and the drag
/// guide line while a grab is in progress.
pub fn build_scene(list: &mut DrawList, sim: &Simulation, pointer: Vec2) {
    list.clear();

    let container = sim.container;
    list.rect_outline(
        Vec2::new(container.left, container.top),
        Vec2::new(container.width, container.height),
        CONTAINER_COLOR,
    );

    for body in &sim.bodies {
        list.circle(body.position, body.radius, body.color);
    }

    if let Some((start, end)) = sim.drag_line(pointer) {
        list.top_line(start, end, GUIDE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Container, BODY_COUNT, BODY_RADIUS};

    #[test]
    fn scene_contains_outline_discs_and_guide() {
        let container = Container::new(50.0, 50.0, 700.0, 500.0);
        let mut sim = Simulation::new(container, BODY_COUNT, BODY_RADIUS);
        let grab = sim.bodies[0].position;
        sim.start_drag(grab);

        let mut list = DrawList::default();
        build_scene(&mut list, &sim, grab + Vec2::new(40.0, 0.0));

        assert_eq!(list.circles.len(), BODY_COUNT);
        assert_eq!(list.lines.len(), 8);
        assert_eq!(list.top_lines.len(), 2);
    }
}
