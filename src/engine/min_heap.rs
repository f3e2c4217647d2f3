/// Array-backed binary min-heap driven only by `<`.
///
/// The sift order is fixed (heapify from the last parent down, pop moves the
/// smaller child up to a leaf and then sifts the displaced item back), so for
/// a given seed order the position of equal items is fully determined.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T: PartialOrd> MinHeap<T> {
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.elements.len();
        for i in (0..n / 2).rev() {
            heap.sift_up(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
        let last = self.elements.len() - 1;
        self.sift_down(0, last);
    }

    pub fn pop(&mut self) -> Option<T> {
        let last = self.elements.pop()?;
        if self.elements.is_empty() {
            return Some(last);
        }
        let min = std::mem::replace(&mut self.elements[0], last);
        self.sift_up(0);
        Some(min)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.elements[a] < self.elements[b]
    }

    /// Moves the item at `pos` towards the root while it is smaller than its parent.
    fn sift_down(&mut self, start: usize, mut pos: usize) {
        while pos > start {
            let parent = (pos - 1) >> 1;
            if !self.less(pos, parent) {
                break;
            }
            self.elements.swap(pos, parent);
            pos = parent;
        }
    }

    /// Carries the item at `pos` down to a leaf along the smaller children,
    /// then lets it rise back into place.
    fn sift_up(&mut self, mut pos: usize) {
        let end = self.elements.len();
        let start = pos;
        let mut child = 2 * pos + 1;
        while child < end {
            let right = child + 1;
            if right < end && !self.less(child, right) {
                child = right;
            }
            self.elements.swap(pos, child);
            pos = child;
            child = 2 * pos + 1;
        }
        self.sift_down(start, pos);
    }
}
