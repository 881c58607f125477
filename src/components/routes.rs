use yew_router::Routable;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/videos")]
    Videos,
    #[at("/videos/:id")]
    VideoDetail { id: i64 },
    #[at("/actors/:id")]
    Actor { id: i64 },
    #[at("/creators/:id")]
    Creator { id: i64 },
    #[at("/tags/:id")]
    Tag { id: i64 },
    #[at("/mypage")]
    MyPage,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Pages that need a signed-in viewer even when the catalog is public.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::MyPage)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::NotFound)
    }
}
