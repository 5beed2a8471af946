use serde::{Deserialize, Serialize};

/// The page a session is currently looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "title", rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Login,
    Register,
    MyCourses,
    Course(String),
}

/// A navigation request coming from the header buttons or a course tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", content = "title", rename_all = "snake_case")]
pub enum Nav {
    Home,
    Login,
    Register,
    MyCourses,
    Course(String),
    BackToHome,
}

/// Everything that can move a session between pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Navigate(Nav),
    Registered,
    LoggedIn,
    LoggedOut,
}

impl Page {
    /// Next page for `transition`. Targets not offered to the caller
    /// (login/register once signed in, my-courses while anonymous) leave
    /// the page unchanged.
    pub fn next(&self, transition: &Transition, authenticated: bool) -> Page {
        match transition {
            Transition::Registered if !authenticated => Page::Login,
            Transition::Registered => self.clone(),
            Transition::LoggedIn | Transition::LoggedOut => Page::Home,
            Transition::Navigate(nav) => match nav {
                Nav::Home | Nav::BackToHome => Page::Home,
                Nav::Login if !authenticated => Page::Login,
                Nav::Register if !authenticated => Page::Register,
                Nav::MyCourses if authenticated => Page::MyCourses,
                Nav::Course(title) => Page::Course(title.clone()),
                Nav::Login | Nav::Register | Nav::MyCourses => self.clone(),
            },
        }
    }

    pub fn course_title(&self) -> Option<&str> {
        match self {
            Page::Course(title) => Some(title),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(page: &Page, nav: Nav, authenticated: bool) -> Page {
        page.next(&Transition::Navigate(nav), authenticated)
    }

    #[test]
    fn anonymous_header_offers_home_login_register() {
        assert_eq!(nav(&Page::Home, Nav::Login, false), Page::Login);
        assert_eq!(nav(&Page::Login, Nav::Register, false), Page::Register);
        assert_eq!(nav(&Page::Register, Nav::Home, false), Page::Home);
        assert_eq!(nav(&Page::Home, Nav::MyCourses, false), Page::Home);
    }

    #[test]
    fn signed_in_header_offers_home_and_my_courses() {
        assert_eq!(nav(&Page::Home, Nav::MyCourses, true), Page::MyCourses);
        assert_eq!(nav(&Page::MyCourses, Nav::Login, true), Page::MyCourses);
        assert_eq!(nav(&Page::MyCourses, Nav::Register, true), Page::MyCourses);
    }

    #[test]
    fn course_tiles_and_back_button() {
        let course = nav(&Page::Home, Nav::Course("Data Science".into()), false);
        assert_eq!(course.course_title(), Some("Data Science"));
        assert_eq!(nav(&course, Nav::BackToHome, false), Page::Home);
    }

    #[test]
    fn auth_events_route_regardless_of_page() {
        assert_eq!(Page::Register.next(&Transition::Registered, false), Page::Login);
        assert_eq!(Page::Login.next(&Transition::LoggedIn, true), Page::Home);
        let course = Page::Course("Cloud Computing".into());
        assert_eq!(course.next(&Transition::LoggedOut, false), Page::Home);
    }

    #[test]
    fn registering_while_signed_in_stays_put() {
        assert_eq!(Page::Home.next(&Transition::Registered, true), Page::Home);
        assert_eq!(Page::MyCourses.next(&Transition::Registered, true), Page::MyCourses);
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_value(Page::Course("Web Development".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "course", "title": "Web Development"}));
        assert_eq!(
            serde_json::to_value(Page::MyCourses).unwrap(),
            serde_json::json!({"kind": "my_courses"})
        );

        let nav: Nav = serde_json::from_str(r#"{"to":"back_to_home"}"#).unwrap();
        assert_eq!(nav, Nav::BackToHome);
        let nav: Nav = serde_json::from_str(r#"{"to":"course","title":"Data Science"}"#).unwrap();
        assert_eq!(nav, Nav::Course("Data Science".into()));
    }
}
