use crate::bean::BeanUtil;
use crate::registry::Introspector;

/// The conventional navigator configurations, sharing one [`Introspector`].
///
/// # Examples
///
/// ```
/// use vc_bean::bean::Presets;
///
/// let presets = Presets::default();
/// assert!(presets.declared_forced.is_declared() && presets.declared_forced.is_forced());
/// assert!(!presets.pojo.is_silent());
/// ```
#[derive(Debug, Clone)]
pub struct Presets {
    /// Public members only, not forced, not silent.
    pub pojo: BeanUtil,
    pub declared: BeanUtil,
    pub silent: BeanUtil,
    pub forced: BeanUtil,
    pub declared_silent: BeanUtil,
    pub declared_forced: BeanUtil,
    pub declared_forced_silent: BeanUtil,
    pub forced_silent: BeanUtil,
}

impl Presets {
    pub fn new(introspector: Introspector) -> Self {
        let pojo = BeanUtil::new(introspector);
        Self {
            declared: pojo.clone().declared(true),
            silent: pojo.clone().silent(true),
            forced: pojo.clone().forced(true),
            declared_silent: pojo.clone().declared(true).silent(true),
            declared_forced: pojo.clone().declared(true).forced(true),
            declared_forced_silent: pojo.clone().declared(true).forced(true).silent(true),
            forced_silent: pojo.clone().forced(true).silent(true),
            pojo,
        }
    }

    #[inline]
    pub fn introspector(&self) -> &Introspector {
        self.pojo.introspector()
    }
}

impl Default for Presets {
    #[inline]
    fn default() -> Self {
        Self::new(Introspector::new())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::Presets;
    use crate::info::Typed;

    #[test]
    fn presets_share_the_introspector() {
        let presets = Presets::default();
        presets.forced_silent.introspector().lookup_type::<Vec<u8>>();

        assert!(presets.pojo.introspector().contains(Vec::<u8>::type_info()));
        assert!(presets.introspector().contains(Vec::<u8>::type_info()));

        let flags = |beans: &crate::bean::BeanUtil| (beans.is_declared(), beans.is_forced(), beans.is_silent());
        assert_eq!(flags(&presets.pojo), (false, false, false));
        assert_eq!(flags(&presets.declared_silent), (true, false, true));
        assert_eq!(flags(&presets.declared_forced_silent), (true, true, true));
        assert_eq!(flags(&presets.forced_silent), (false, true, true));
    }
}
