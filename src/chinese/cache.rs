//! 各歲結果的緩存
//!
//! 編算結果只取決於年份與曆表，不會過期，故僅按容量以先進先出淘汰。

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tracing::debug;

/// 以年份為鍵、容量有限的先進先出緩存。
///
/// 值以 [`Rc`] 共享，淘汰後調用者手中已取得的值仍然有效。
#[derive(Debug)]
pub struct YearCache<V> {
    capacity: usize,
    entries: HashMap<i32, Rc<V>>,
    order: VecDeque<i32>,
}

impl<V> YearCache<V> {
    pub fn new(capacity: usize) -> Self {
        YearCache {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, year: i32) -> Option<Rc<V>> {
        self.entries.get(&year).cloned()
    }

    /// 存入 `year` 的結果並返回其共享引用；超出容量時淘汰最早存入者。
    ///
    /// `year` 已存在時替換其值，但不改變淘汰順序。
    pub fn insert(&mut self, year: i32, value: V) -> Rc<V> {
        let value = Rc::new(value);
        if self.entries.insert(year, Rc::clone(&value)).is_none() {
            self.order.push_back(year);
        }
        while self.order.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            debug!(year = oldest, capacity = self.capacity, "evicted lunisolar year");
        }
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
