use spark_structures::{min_heap, use_min_heap, Comparator, MinHeap, NaturalOrder, Reversed};
use std::cmp::Ordering;

#[test]
fn test_adds_one_at_a_time() {
    let mut heap = MinHeap::new();
    heap.add(1);
    assert_eq!(heap.dump(), &[1]);
    heap.add(3);
    assert_eq!(heap.dump(), &[1, 3]);
    heap.add(5);
    assert_eq!(heap.dump(), &[1, 3, 5]);
    heap.add(6);
    assert_eq!(heap.dump(), &[1, 3, 5, 6]);
    heap.add(8);
    assert_eq!(heap.dump(), &[1, 3, 5, 6, 8]);
    heap.add(9);
    assert_eq!(heap.dump(), &[1, 3, 5, 6, 8, 9]);
}

#[test]
fn test_adds_all_in_reverse() {
    let heap = use_min_heap(Vec::new());
    for value in [9, 8, 6, 5, 3, 1] {
        heap.add(value);
    }
    assert_eq!(heap.dump(), vec![1, 5, 3, 9, 6, 8]);
}

#[test]
fn test_gets_minimum_in_order_then_none() {
    let heap = use_min_heap(Vec::new());
    let input = [10, 2, 1, 99, 3, 5, 7];
    for value in input {
        heap.add(value);
    }

    let mut expected = input.to_vec();
    expected.sort();
    for value in expected {
        assert_eq!(heap.extract_min(), Some(value));
    }
    assert_eq!(heap.extract_min(), None);
}

#[test]
fn test_peek_repeatedly_without_removing() {
    let heap = use_min_heap([10, 2, 1, 99, 3]);
    for _ in 0..5 {
        assert_eq!(heap.peek(), Some(1));
    }
    assert_eq!(heap.len(), 5);
}

#[test]
fn test_empty_heap_reads_none() {
    let heap = use_min_heap(Vec::<u8>::new());
    assert_eq!(heap.extract_min(), None);
    assert_eq!(heap.peek(), None);
    assert!(heap.is_empty());
}

#[test]
fn test_clear_then_read() {
    let heap = use_min_heap([1, 2, 3]);
    heap.clear();
    assert_eq!(heap.dump(), Vec::<i32>::new());
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.extract_min(), None);
}

#[test]
fn test_strings_extract_lexicographically() {
    let mut heap = min_heap!["delta", "alpha", "charlie", "bravo"];
    let mut out = Vec::new();
    while let Some(word) = heap.extract_min() {
        out.push(word);
    }
    assert_eq!(out, vec!["alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn test_reversed_comparator_gives_max_heap() {
    let heap = MinHeap::from_values_with([4, 9, 1, 7], Reversed(NaturalOrder));
    assert_eq!(heap.peek(), Some(&9));
    assert_eq!(heap.into_sorted_vec(), vec![9, 7, 4, 1]);
}

#[test]
fn test_float_comparator() {
    let by_total = |a: &f64, b: &f64| a.total_cmp(b);
    let mut heap = MinHeap::from_values_with([2.5, -1.0, 0.25], by_total);
    assert_eq!(heap.extract_min(), Some(-1.0));
    assert_eq!(heap.extract_min(), Some(0.25));
    assert!(by_total.less(&0.0, &1.0));
}

#[test]
fn test_struct_elements_with_comparator() {
    #[derive(Debug, Clone, PartialEq)]
    struct Job {
        deadline: u32,
        name: String,
    }

    let by_deadline = |a: &Job, b: &Job| -> Ordering { a.deadline.cmp(&b.deadline) };
    let jobs = (0..20u32).rev().map(|d| Job {
        deadline: d * 3 % 20,
        name: format!("job-{d}"),
    });
    let heap = MinHeap::from_values_with(jobs, by_deadline);

    let deadlines: Vec<u32> = heap
        .clone()
        .into_sorted_vec()
        .into_iter()
        .map(|j| j.deadline)
        .collect();
    let mut sorted = deadlines.clone();
    sorted.sort();
    assert_eq!(deadlines, sorted);
    assert!(heap.iter().any(|j| j.name == "job-0"));
}

#[test]
fn test_heapify_matches_sorted_extraction() {
    let mut heap = MinHeap::new();
    let values: Vec<i32> = (0..50).map(|i| (i * 37) % 50).collect();
    heap.heapify(values.clone());

    let mut sorted = values;
    sorted.sort();
    assert_eq!(heap.into_sorted_vec(), sorted);
}
