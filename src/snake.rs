use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// A body segment. `None` is a placeholder appended when the snake eats; it
/// occupies no cell until the shift pushes it out of the tail.
pub type Segment = Option<Coords>;

pub struct Snake {
    head: Coords,
    body: Vec<Segment>,
    pending: Option<Direction>,
    // Opposite of the last committed move, once there is a neck to run into
    reverse_lock: Option<Direction>,
}

impl Snake {
    pub fn new(head: Coords) -> Self {
        Snake { head, body: vec![], pending: None, reverse_lock: None }
    }

    pub fn head(&self) -> Coords {
        self.head
    }

    /// Body cells that have a real position, head excluded.
    pub fn segments(&self) -> impl Iterator<Item = Coords> + '_ {
        self.body.iter().flatten().copied()
    }

    /// Returns false when the turn was refused because it would reverse the
    /// snake into its own neck.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if self.reverse_lock == Some(new_direction) {
            return false;
        }

        self.pending = Some(new_direction);
        true
    }

    /// Shifts the body and moves the head one cell. Does nothing until a
    /// direction has been set.
    pub fn move_step(&mut self) -> bool {
        let direction = match self.pending {
            Some(dir) => dir,
            None => return false,
        };

        self.body.insert(0, Some(self.head));
        let (dx, dy) = direction.delta();
        self.head = (self.head.0 + dx, self.head.1 + dy);
        self.body.pop();

        if !self.body.is_empty() {
            self.reverse_lock = Some(direction.opposite());
        }

        true
    }

    pub fn bites_itself(&self) -> bool {
        self.segments().any(|cell| cell == self.head)
    }

    pub fn occupies(&self, cell: Coords) -> bool {
        self.head == cell || self.segments().any(|seg| seg == cell)
    }

    pub fn grow(&mut self, segments: usize) {
        self.body.extend((0..segments).map(|_| None));
    }
}

#[cfg(test)]
impl Snake {
    pub(crate) fn body(&self) -> &[Segment] {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub(crate) fn with_body(head: Coords, body: Vec<Coords>, direction: Direction) -> Self {
        Snake {
            head,
            body: body.into_iter().map(Some).collect(),
            pending: Some(direction),
            reverse_lock: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_until_first_direction() {
        let mut snake = Snake::new((5, 5));
        assert!(!snake.move_step());
        assert_eq!(snake.head(), (5, 5));
    }

    #[test]
    fn test_moves_one_cell_per_step() {
        let mut snake = Snake::new((5, 5));
        snake.set_direction(Up);
        snake.move_step();
        assert_eq!(snake.head(), (5, 4));

        snake.set_direction(Left);
        snake.move_step();
        assert_eq!(snake.head(), (4, 4));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_reversal_allowed_without_body() {
        let mut snake = Snake::new((5, 5));
        snake.set_direction(Right);
        snake.move_step();
        assert!(snake.set_direction(Left));
        assert_eq!(snake.pending_direction(), Some(Left));
    }

    #[test]
    fn test_reversal_refused_with_body() {
        let mut snake = Snake::new((5, 5));
        snake.set_direction(Right);
        snake.grow(1);
        snake.move_step();

        assert!(!snake.set_direction(Left));
        assert_eq!(snake.pending_direction(), Some(Right));
        assert!(snake.set_direction(Up));
    }

    #[test]
    fn test_lock_follows_committed_direction_not_pending() {
        let mut snake = Snake::new((5, 5));
        snake.set_direction(Right);
        snake.grow(1);
        snake.move_step();

        // Up then Left before the next tick would still fold into the neck
        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.pending_direction(), Some(Up));
    }

    #[test]
    fn test_placeholders_shift_out() {
        let mut snake = Snake::new((5, 5));
        snake.set_direction(Right);
        snake.grow(3);
        assert_eq!(snake.body(), &[None, None, None]);

        snake.move_step();
        assert_eq!(snake.body(), &[Some((5, 5)), None, None]);
        snake.move_step();
        snake.move_step();
        assert_eq!(snake.body(), &[Some((7, 5)), Some((6, 5)), Some((5, 5))]);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_placeholders_never_collide() {
        let mut snake = Snake::new((0, 0));
        snake.grow(3);
        assert!(!snake.bites_itself());
        assert!(!snake.occupies((0, 1)));
        assert!(snake.occupies((0, 0)));
    }

    #[test]
    fn test_bites_itself() {
        let mut snake = Snake::with_body((5, 5), vec![(4, 5), (4, 6), (5, 6), (6, 6), (6, 5)], Down);
        snake.move_step();
        assert_eq!(snake.head(), (5, 6));
        assert!(snake.bites_itself());
    }

    #[test]
    fn test_chasing_the_tail_is_safe() {
        let mut snake = Snake::with_body((5, 5), vec![(4, 5), (4, 6), (5, 6), (6, 6), (6, 5)], Right);
        snake.move_step();
        assert_eq!(snake.head(), (6, 5));
        assert!(!snake.bites_itself());
    }
}
