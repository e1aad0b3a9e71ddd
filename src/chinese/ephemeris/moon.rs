//! 合朔時刻，據 Meeus《天文算法》第 49 章。

use crate::time_scales::Tt;

/// `k = 0` 的平朔（2000 年 1 月 6 日）
pub(super) const EPOCH: f64 = 2451550.09766;
pub(super) const SYNODIC_MONTH: f64 = 29.530588861;

/// 朔的周期項係數，`(係數, E 的冪次, [M, M′, F, Ω] 的倍數)`。
const PERIODIC: &[(f64, i32, [f64; 4])] = &[
    (-0.40720, 0, [0.0, 1.0, 0.0, 0.0]),
    (0.17241, 1, [1.0, 0.0, 0.0, 0.0]),
    (0.01608, 0, [0.0, 2.0, 0.0, 0.0]),
    (0.01039, 0, [0.0, 0.0, 2.0, 0.0]),
    (0.00739, 1, [-1.0, 1.0, 0.0, 0.0]),
    (-0.00514, 1, [1.0, 1.0, 0.0, 0.0]),
    (0.00208, 2, [2.0, 0.0, 0.0, 0.0]),
    (-0.00111, 0, [0.0, 1.0, -2.0, 0.0]),
    (-0.00057, 0, [0.0, 1.0, 2.0, 0.0]),
    (0.00056, 1, [1.0, 2.0, 0.0, 0.0]),
    (-0.00042, 0, [0.0, 3.0, 0.0, 0.0]),
    (0.00042, 1, [1.0, 0.0, 2.0, 0.0]),
    (0.00038, 1, [1.0, 0.0, -2.0, 0.0]),
    (-0.00024, 1, [-1.0, 2.0, 0.0, 0.0]),
    (-0.00017, 0, [0.0, 0.0, 0.0, 1.0]),
    (-0.00007, 0, [2.0, 1.0, 0.0, 0.0]),
    (0.00004, 0, [0.0, 2.0, -2.0, 0.0]),
    (0.00004, 0, [3.0, 0.0, 0.0, 0.0]),
    (0.00003, 0, [1.0, 1.0, -2.0, 0.0]),
    (0.00003, 0, [0.0, 2.0, 2.0, 0.0]),
    (-0.00003, 0, [1.0, 1.0, 2.0, 0.0]),
    (0.00003, 0, [-1.0, 1.0, 2.0, 0.0]),
    (-0.00002, 0, [-1.0, 1.0, -2.0, 0.0]),
    (-0.00002, 0, [1.0, 3.0, 0.0, 0.0]),
    (0.00002, 0, [0.0, 4.0, 0.0, 0.0]),
];

/// 行星攝動項 A1..A14，`(係數 ×1e-6 日, 初相, k 的係數)`；A1 另有 T² 項。
const PLANETARY: &[(f64, f64, f64)] = &[
    (325.0, 299.77, 0.107408),
    (165.0, 251.88, 0.016321),
    (164.0, 251.83, 26.651886),
    (126.0, 349.42, 36.412478),
    (110.0, 84.66, 18.206239),
    (62.0, 141.74, 53.303771),
    (60.0, 207.14, 2.453732),
    (56.0, 154.84, 7.306860),
    (47.0, 34.52, 27.261239),
    (42.0, 207.19, 0.121824),
    (40.0, 291.34, 1.844379),
    (37.0, 161.72, 24.198154),
    (35.0, 239.56, 25.513099),
    (23.0, 331.55, 3.592518),
];

/// 第 `k` 次合朔的時刻，`k` 須為整數，0 為 2000 年 1 月 6 日之朔。
pub(super) fn new_moon(k: f64) -> Tt {
    let t = k / 1236.85;
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let mean = EPOCH + SYNODIC_MONTH * k + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let args = [
        2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3,
        201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3 - 0.000000058 * t4,
        160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3 + 0.000000011 * t4,
        124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3,
    ]
    .map(f64::to_radians);

    let periodic: f64 = PERIODIC
        .iter()
        .map(|&(coeff, e_pow, mult)| {
            let arg: f64 = mult.iter().zip(&args).map(|(m, a)| m * a).sum();
            coeff * e.powi(e_pow) * arg.sin()
        })
        .sum();
    let planetary: f64 = PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(coeff, phase, rate))| {
            let extra = if i == 0 { -0.009173 * t2 } else { 0.0 };
            coeff * 1e-6 * (phase + rate * k + extra).to_radians().sin()
        })
        .sum();

    Tt(mean + periodic + planetary)
}
