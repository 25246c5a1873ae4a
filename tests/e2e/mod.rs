// End-to-end tests for the News Podcast Backend API
//
// Each test builds the full router in-process with the in-memory cache
// backend and mock news, language model and speech collaborators, then
// drives it with `tower::ServiceExt::oneshot`. No network or AWS access
// is needed, so tests run in parallel.

mod test_explore;
mod test_news;
mod test_summarize;
