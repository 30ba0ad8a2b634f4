use nexus_shape2d::{Circle, Polygon, Shape2D, ShapeGrid, Vec2};

struct Car {
    direction: Vec2,
}

const CAR_RADIUS: f32 = 1.0;

fn main() {
    // Creates the grid with cell size 10
    let mut g: ShapeGrid<Car> = ShapeGrid::new(10);

    // A rock in the middle that every car drives towards
    g.insert(
        Polygon::new_rectangle(-3.0, -3.0, 6.0, 6.0),
        Car {
            direction: Vec2::zero(),
        },
    );

    // create cars in the range x: [-50..50], y: [-50..50]
    for _ in 0..100 {
        let pos = Vec2::new(
            100.0 * rand::random::<f32>() - 50.0,
            100.0 * rand::random::<f32>() - 50.0,
        );
        let direction = -pos / pos.length();
        g.insert(Circle::new(pos, CAR_RADIUS), Car { direction });
    }

    for _ in 0..50 {
        update_loop(&mut g);
    }
}

fn update_loop(g: &mut ShapeGrid<Car>) {
    println!("{} objects left", g.len());

    let handles: Vec<_> = g.handles().collect();
    // Handle collisions (remove cars on collide)
    for &h in &handles {
        let shape = match g.get(h) {
            Some((Shape2D::Circle(c), _)) => *c,
            _ => continue,
        };

        let collided = g.query(shape).any(|(other_h, _, _)| other_h != h);
        if collided {
            g.remove(h);
        }
    }

    // Move the cars that are left
    for h in handles {
        let moved = match g.get(h) {
            Some((Shape2D::Circle(c), car)) => Circle::new(c.center + car.direction, c.radius),
            _ => continue,
        };
        g.set_shape(h, moved);
    }
}
