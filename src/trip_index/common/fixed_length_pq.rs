/// Keeps the `length` largest elements pushed so far, evicting the smallest.
///
/// Backed by a plain array laid out as a binary min-heap: the root at index 0
/// is the smallest retained element, children of `i` live at `2i + 1` and
/// `2i + 2`. An element only replaces the root if it is strictly greater, so
/// on ties the element that arrived first is kept.
#[derive(Clone, Debug)]
pub struct FixedLengthPriorityQueue<T: Ord> {
    heap: Vec<T>,
    length: usize,
}

impl<T: Ord> Default for FixedLengthPriorityQueue<T> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T: Ord> FixedLengthPriorityQueue<T> {
    pub fn new(length: usize) -> Self {
        FixedLengthPriorityQueue::<T> {
            heap: Vec::with_capacity(length),
            length,
        }
    }

    /// Offers a value to the queue.
    ///
    /// Returns the element that did not make it: `None` if the queue still had
    /// room, the evicted minimum if `value` replaced it, or `value` itself if it
    /// was not greater than the current minimum.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.heap.len() < self.length {
            self.heap.push(value);
            self.sift_up(self.heap.len() - 1);
            return None;
        }

        match self.heap.first_mut() {
            Some(min) if value > *min => {
                let evicted = std::mem::replace(min, value);
                self.sift_down(0);
                Some(evicted)
            }
            _ => Some(value),
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[parent] <= self.heap[idx] {
                break;
            }
            self.heap.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let size = self.heap.len();
        loop {
            let left = idx * 2 + 1;
            let right = idx * 2 + 2;
            let mut smallest = idx;
            if left < size && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < size && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }

    /// Consumes the queue, largest element first
    pub fn into_vec(mut self) -> Vec<T> {
        self.heap.sort_by(|a, b| b.cmp(a));
        self.heap
    }

    /// Smallest retained element
    pub fn top(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Returns actual length of the queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.length
    }

    /// Raw heap array, in heap order rather than sorted order
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }
}

impl<T: Ord + Clone> FixedLengthPriorityQueue<T> {
    /// Retained elements, largest first. Leaves the queue untouched.
    pub fn sorted_desc(&self) -> Vec<T> {
        self.clone().into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip_index::common::scored_candidate::ScoredItem;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn is_min_heap<T: Ord>(heap: &[T]) -> bool {
        (0..heap.len()).all(|i| {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            (left >= heap.len() || heap[i] <= heap[left])
                && (right >= heap.len() || heap[i] <= heap[right])
        })
    }

    fn top_k(length: usize, values: &[i32]) -> Vec<i32> {
        let mut queue = FixedLengthPriorityQueue::new(length);
        for &value in values {
            queue.push(value);
        }
        queue.into_vec()
    }

    #[test]
    fn keeps_largest_three() {
        assert_eq!(top_k(3, &[5, 1, 9, 3, 7]), vec![9, 7, 5]);
    }

    #[test]
    fn fewer_values_than_length() {
        assert_eq!(top_k(3, &[1, 2]), vec![2, 1]);
    }

    #[test]
    fn zero_length_keeps_nothing() {
        let mut queue = FixedLengthPriorityQueue::new(0);
        assert_eq!(queue.push(4), Some(4));
        assert_eq!(queue.push(8), Some(8));
        assert!(queue.is_empty());
        assert_eq!(queue.into_vec(), Vec::<i32>::new());
    }

    #[test]
    fn duplicates_fill_the_queue() {
        assert_eq!(top_k(2, &[5, 5, 5]), vec![5, 5]);
    }

    #[test]
    fn push_reports_rejected_element() {
        let mut queue = FixedLengthPriorityQueue::new(2);
        assert_eq!(queue.push(3), None);
        assert_eq!(queue.push(6), None);
        // full: 1 is not better than the minimum
        assert_eq!(queue.push(1), Some(1));
        // 4 evicts 3
        assert_eq!(queue.push(4), Some(3));
        assert_eq!(queue.top(), Some(&4));
        assert_eq!(queue.capacity(), 2);
    }

    #[test]
    fn first_arrival_wins_ties() {
        let mut queue = FixedLengthPriorityQueue::new(1);
        queue.push(ScoredItem::new(3.0, 1, 10.0, 3.0));
        queue.push(ScoredItem::new(10.0, 2, 10.0, 10.0));
        queue.push(ScoredItem::new(2.0, 3, 10.0, 2.0));
        let rejected = queue.push(ScoredItem::new(10.0, 4, 10.0, 10.0));

        assert_eq!(rejected.map(|item| item.trip_id), Some(4));
        let kept = queue.into_vec();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 10.0);
        assert_eq!(kept[0].trip_id, 2);
    }

    #[test]
    fn sorted_desc_is_repeatable() {
        let mut queue = FixedLengthPriorityQueue::new(4);
        for value in [8, 3, 11, 2, 7, 7, 15] {
            queue.push(value);
        }
        let first = queue.sorted_desc();
        let second = queue.sorted_desc();
        assert_eq!(first, vec![15, 11, 8, 7]);
        assert_eq!(first, second);
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn empty_queue_sorts_to_nothing() {
        let queue = FixedLengthPriorityQueue::<i32>::new(5);
        assert!(queue.sorted_desc().is_empty());
        assert_eq!(queue.top(), None);
    }

    #[quickcheck]
    fn length_and_heap_order_hold_after_every_push(length: u8, values: Vec<i32>) -> bool {
        let length = (length % 32) as usize;
        let mut queue = FixedLengthPriorityQueue::new(length);
        values.into_iter().all(|value| {
            queue.push(value);
            queue.len() <= length && is_min_heap(queue.as_slice())
        })
    }

    #[quickcheck]
    fn matches_sort_and_truncate(length: u8, values: Vec<i32>) -> bool {
        let length = (length % 32) as usize;
        let mut expected = values.clone();
        expected.sort_by(|a, b| b.cmp(a));
        expected.truncate(length);
        top_k(length, &values) == expected
    }

    #[quickcheck]
    fn minimum_never_decreases_once_full(length: u8, values: Vec<i32>) -> TestResult {
        let length = (length % 16) as usize + 1;
        if values.len() <= length {
            return TestResult::discard();
        }
        let mut queue = FixedLengthPriorityQueue::new(length);
        let mut last_min = None;
        for value in values {
            queue.push(value);
            if queue.len() == length {
                let min = queue.top().copied();
                if last_min.is_some() && min < last_min {
                    return TestResult::failed();
                }
                last_min = min;
            }
        }
        TestResult::passed()
    }
}
