//! Генераторы комбинаций индексов.
//!
//! Оба генератора возвращают материализованный `Vec`, а не ленивый итератор:
//! результат можно переиспользовать и обходить сколько угодно раз.

/// Все `n^k` упорядоченных кортежей длины `k` над алфавитом `0..n`.
///
/// Порядок - смешанная система счисления, позиция 0 меняется быстрее всех:
/// `[0,0] [1,0] [2,0] [0,1] ...`
pub fn with_repetitions(n: usize, k: usize) -> Vec<Vec<usize>> {
    let total = n.pow(k as u32);
    let mut combinations = Vec::with_capacity(total);
    for i in 0..total {
        let mut combination = Vec::with_capacity(k);
        let mut radix = 1;
        for _ in 0..k {
            combination.push((i / radix) % n);
            radix *= n;
        }
        combinations.push(combination);
    }
    combinations
}

/// Все `C(n, k)` строго возрастающих подмножеств размера `k` из `0..n`
/// в лексикографическом порядке ("одометр").
///
/// При `k > n` возвращает пустой вектор.
pub fn without_repetitions(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut combinations = Vec::new();
    if k > n {
        return combinations;
    }

    let mut odometer: Vec<usize> = (0..k).collect();
    loop {
        combinations.push(odometer.clone());

        // Самая правая позиция, которая ещё не упёрлась в свой максимум `n - k + e`.
        let Some(e) = (0..k).rev().find(|&e| odometer[e] != n - k + e) else {
            return combinations;
        };
        odometer[e] += 1;
        for i in e + 1..k {
            odometer[i] = odometer[i - 1] + 1;
        }
    }
}

/// Биномиальный коэффициент `C(n, k)`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
