//! # 测量样本与数据序列
//!
//! 每个扫描步产生一个 `Sample`，按晶体角递增顺序追加到 `Series`。
//!
//! ## 依赖关系
//! - 被 `scan/controller.rs`, `spectrum/reduction.rs`, `spectrum/export.rs` 使用
//! - 使用 `serde` 派生 CSV 行

use serde::Serialize;

/// 单次测量
///
/// 探测器臂与晶体联动，探测器角恒为晶体角的两倍，因此只在构造时计算一次。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// 晶体角 θt（度）
    #[serde(rename = "crystal_angle_deg")]
    crystal_angle: f64,
    /// 探测器角 θs = 2θt（度）
    #[serde(rename = "sensor_angle_deg")]
    sensor_angle: f64,
    /// Bragg 波长 (pm)
    #[serde(rename = "wavelength_pm")]
    wavelength: f64,
    /// 计数率 R（counts/s）
    #[serde(rename = "count_rate")]
    count_rate: f64,
}

impl Sample {
    pub fn new(crystal_angle: f64, wavelength: f64, count_rate: f64) -> Self {
        Self {
            crystal_angle,
            sensor_angle: crystal_angle * 2.0,
            wavelength,
            count_rate: count_rate.max(0.0),
        }
    }

    pub fn crystal_angle(&self) -> f64 {
        self.crystal_angle
    }

    pub fn sensor_angle(&self) -> f64 {
        self.sensor_angle
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn count_rate(&self) -> f64 {
        self.count_rate
    }
}

/// 按晶体角严格递增的样本序列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// 追加样本，晶体角必须大于末尾样本
    pub fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.samples
                .last()
                .map_or(true, |last| sample.crystal_angle > last.crystal_angle),
            "series angles must be strictly increasing"
        );
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// 最大计数率，空序列返回 None
    pub fn max_count_rate(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.count_rate)
            .reduce(f64::max)
    }

    /// 计数率最高的样本
    pub fn strongest(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .max_by(|a, b| a.count_rate.total_cmp(&b.count_rate))
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let mut series = Series::new();
        for sample in iter {
            series.push(sample);
        }
        series
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_angle_is_twice_crystal_angle() {
        for i in 10..=200 {
            let theta = i as f64 / 10.0;
            let sample = Sample::new(theta, 0.0, 0.0);
            assert_eq!(sample.sensor_angle(), 2.0 * theta);
        }
    }

    #[test]
    fn test_negative_count_rate_clamped() {
        let sample = Sample::new(5.0, 49.1, -3.0);
        assert_eq!(sample.count_rate(), 0.0);
    }

    #[test]
    fn test_series_max_and_strongest() {
        let series: Series = [(1.0, 10.0), (1.1, 250.0), (1.2, 40.0)]
            .into_iter()
            .map(|(angle, rate)| Sample::new(angle, 0.0, rate))
            .collect();

        assert_eq!(series.len(), 3);
        assert_eq!(series.max_count_rate(), Some(250.0));
        assert_eq!(series.strongest().map(|s| s.crystal_angle()), Some(1.1));
    }

    #[test]
    fn test_empty_series() {
        let series = Series::new();
        assert!(series.is_empty());
        assert_eq!(series.max_count_rate(), None);
        assert!(series.strongest().is_none());
    }
}
